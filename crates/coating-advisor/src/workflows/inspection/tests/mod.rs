mod common;
mod cycles;
mod routing;
mod service;

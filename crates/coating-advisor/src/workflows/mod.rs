pub mod inspection;

pub mod command;
pub mod dataset;
pub mod row;

pub mod forms;
pub mod records;
pub mod response;

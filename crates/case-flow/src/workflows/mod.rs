pub mod assignments;
pub mod cases;

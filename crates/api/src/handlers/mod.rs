pub mod generate;
pub mod studio;
pub mod styles;

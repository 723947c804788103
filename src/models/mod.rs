mod draft;
mod expense;

pub use draft::Draft;
pub use expense::Expense;

mod load;
mod record;

pub use load::load_rows;
pub use record::AbilityRow;

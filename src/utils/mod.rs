pub mod errors;
pub mod icons;
pub mod markup;
pub mod number;

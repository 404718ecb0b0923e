pub mod idna;
pub mod normalize;
pub mod percent_encode;

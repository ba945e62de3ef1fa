pub mod product;
pub mod service;

pub use product::{DilutionSplit, Product, ProductKind};
pub use service::{LinkedProduct, ServiceLine, ServiceLineBreakdown};

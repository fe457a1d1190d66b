pub mod contract;
pub mod features;
pub mod pricing;
pub mod product;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod contact;
pub mod currency;
pub mod farmer;
pub mod product;
pub mod review;
pub mod storage;
pub mod validation;

pub mod acb;

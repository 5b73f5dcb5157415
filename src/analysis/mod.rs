pub mod cross_reference;

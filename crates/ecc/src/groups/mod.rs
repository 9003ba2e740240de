pub mod affine_element;
pub mod element;
pub mod group_params;
pub mod wnaf;

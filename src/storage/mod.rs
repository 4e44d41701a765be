mod dense;
mod elements;
mod sparse;

pub use elements::{Container, ContainerMut, Elements, ElementsMut};
pub use sparse::SparseVector;

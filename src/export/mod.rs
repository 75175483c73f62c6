pub mod gexf;

pub use gexf::export_tree;

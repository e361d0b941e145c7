pub mod queries;
pub mod resolver;
pub mod treesitter;
pub mod walker;
pub mod workspace;

pub mod go;
pub mod model;

mod cli;
mod parsers;
mod types;


pub use cli::{
    CollectionCommand, CollectionNameArgs, CollectionSaveArgs, Command, ProbeArgs, RequestArgs,
    StressArgs,
};
pub use types::{HttpMethod, PositiveUsize};

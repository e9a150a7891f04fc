use crate::config;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] config::Error),
    #[error("Peg index {index} is out of range for {count} pegs")]
    InvalidPegIndex { index: usize, count: usize },
    #[error("A chord needs two distinct pegs, got peg {0} twice")]
    SamePeg(usize),
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Uninitialized,
    InRound,
    Finished,
}

pub trait Env {
    type State;
    type Action;
    type Status;

    // reset the environment to its initial state
    fn reset(&mut self) -> Self::State;
    // take an action and return the next state and status
    fn step(&mut self, action: Self::Action) -> (Self::State, Self::Status);
    // get the current state of the environment
    fn current_state(&self) -> Self::State;
    // actions that are legal from the current state
    fn legal_actions(&self) -> Vec<Self::Action>;
    // check if the environment is in a terminal state
    fn is_terminal(&self) -> bool;
    // check if the environment is in a win state
    fn is_win(&self) -> bool;
}

pub use rand;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Random source shared by the maze generator, the problem generator and the
/// controller. Seeded runs are reproducible; unseeded runs draw from the OS.
pub fn game_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

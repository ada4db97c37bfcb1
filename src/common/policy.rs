use dyn_clone::DynClone;

use super::spaces::Space;

/// Maps observations to actions. Anything from a trained model to a
/// hand-written rule or a keyboard can sit behind this trait; the
/// environment does not care which.
pub trait Policy<O, A>: DynClone {
    fn act(&mut self, obs: &O) -> A;

    /// Called when a new episode starts.
    fn reset(&mut self) {}
}

dyn_clone::clone_trait_object!(<O, A> Policy<O, A>);

/// Samples uniformly from an action space, ignoring the observation.
#[derive(Clone)]
pub struct RandomPolicy<A: Clone> {
    space: Box<dyn Space<A>>,
}

impl<A: Clone> RandomPolicy<A> {
    pub fn new(space: Box<dyn Space<A>>) -> Self {
        Self { space }
    }
}

impl<O, A: Clone> Policy<O, A> for RandomPolicy<A> {
    fn act(&mut self, _obs: &O) -> A {
        self.space.sample()
    }
}

#[cfg(test)]
mod test {
    use super::{Policy, RandomPolicy};
    use crate::common::spaces::{Discrete, Space};

    #[test]
    fn test_random_policy_stays_in_space() {
        let space = Discrete::from(2);
        let mut policy = RandomPolicy::new(Box::new(space.clone()));

        for _ in 0..100 {
            let action: usize = Policy::<Vec<f32>, usize>::act(&mut policy, &vec![0.0; 3]);
            assert!(space.contains(&action));
        }
    }

    #[test]
    fn test_boxed_policy_clones() {
        let policy: Box<dyn Policy<Vec<f32>, usize>> =
            Box::new(RandomPolicy::new(Box::new(Discrete::from(2))));
        let mut cloned = policy.clone();

        assert!(cloned.act(&vec![]) < 2);
    }
}

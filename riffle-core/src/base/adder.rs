//! Transition producer interface.
use super::{BatchData, Transition};

/// Sink a producer pushes each completed transition into, typically the
/// `store` method of an entry pipe.
pub type GenerateCallback<T> = Box<dyn FnMut(T) + Send>;

/// Assembles environment steps into transition records.
///
/// Implemented by environment-adapter collaborators. An adder declares the
/// fixed transition schema via [`transition_example`](Self::transition_example)
/// (used to size every channel and table slot), receives a sink through
/// [`set_generate_callback`](Self::set_generate_callback), and emits zero or
/// one record per [`add`](Self::add) call; multi-step adders may buffer
/// internally before emitting.
pub trait Adder {
    /// Observation type accepted per step.
    type Obs;

    /// Action type accepted per step.
    type Act;

    /// The transition record type this adder emits.
    type Output;

    /// Returns a record with the schema shared by every emitted transition.
    fn transition_example(&self) -> Self::Output;

    /// Registers the sink called for each completed transition.
    fn set_generate_callback(&mut self, on_generate: GenerateCallback<Self::Output>);

    /// Accepts one environment step: the observation produced by the step,
    /// the action that caused it, the reward and the episode-end flag.
    fn add(&mut self, obs: Self::Obs, act: Self::Act, reward: f32, is_done: bool);
}

/// An [`Adder`] emitting 1-step transitions.
///
/// Keeps the previous observation and emits
/// `(prev_obs, act, obs, reward, is_done)` on every step. After an episode
/// ends the adder disarms itself; [`reset`](Self::reset) must be called with
/// the initial observation of the next episode before the next `add`.
pub struct OneStepAdder<O, A>
where
    O: BatchData + Clone,
    A: BatchData + Clone,
{
    example_obs: O,
    example_act: A,
    prev_obs: Option<O>,
    on_generate: Option<GenerateCallback<Transition<O, A>>>,
}

impl<O, A> OneStepAdder<O, A>
where
    O: BatchData + Clone,
    A: BatchData + Clone,
{
    /// Creates an adder from single-record examples of the observation and
    /// action fields.
    pub fn new(example_obs: O, example_act: A) -> Self {
        Self {
            example_obs,
            example_act,
            prev_obs: None,
            on_generate: None,
        }
    }

    /// Arms the adder with the initial observation of an episode.
    pub fn reset(&mut self, init_obs: O) {
        self.prev_obs = Some(init_obs);
    }
}

impl<O, A> Adder for OneStepAdder<O, A>
where
    O: BatchData + Clone,
    A: BatchData + Clone,
{
    type Obs = O;
    type Act = A;
    type Output = Transition<O, A>;

    fn transition_example(&self) -> Self::Output {
        Transition {
            obs: self.example_obs.clone(),
            act: self.example_act.clone(),
            next_obs: self.example_obs.clone(),
            reward: 0.0,
            is_done: 0,
        }
    }

    fn set_generate_callback(&mut self, on_generate: GenerateCallback<Self::Output>) {
        self.on_generate = Some(on_generate);
    }

    fn add(&mut self, obs: Self::Obs, act: Self::Act, reward: f32, is_done: bool) {
        let prev_obs = match self.prev_obs.take() {
            Some(obs) => obs,
            None => panic!("prev_obs is not set. Forgot to call reset()?"),
        };

        let tr = Transition {
            obs: prev_obs,
            act,
            next_obs: obs.clone(),
            reward,
            is_done: is_done as i8,
        };

        if !is_done {
            self.prev_obs = Some(obs);
        }

        if let Some(on_generate) = self.on_generate.as_mut() {
            on_generate(tr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::ArrayBatch;
    use ndarray::ArrayD;
    use std::sync::{Arc, Mutex};

    fn obs(v: f32) -> ArrayBatch {
        ArrayBatch::from(ArrayD::from_elem(ndarray::IxDyn(&[1, 2]), v))
    }

    fn act(v: f32) -> ArrayBatch {
        ArrayBatch::from(ArrayD::from_elem(ndarray::IxDyn(&[1, 1]), v))
    }

    #[test]
    fn emits_one_step_transitions() {
        let mut adder = OneStepAdder::new(obs(0.0), act(0.0));
        let out = Arc::new(Mutex::new(Vec::new()));
        let sink = out.clone();
        adder.set_generate_callback(Box::new(move |tr: Transition<ArrayBatch, ArrayBatch>| {
            sink.lock().unwrap().push((tr.reward, tr.is_done));
        }));

        adder.reset(obs(1.0));
        adder.add(obs(2.0), act(0.0), 0.5, false);
        adder.add(obs(3.0), act(1.0), 1.5, true);

        let out = out.lock().unwrap();
        assert_eq!(*out, vec![(0.5, 0), (1.5, 1)]);
    }

    #[test]
    #[should_panic]
    fn add_after_done_without_reset_panics() {
        let mut adder: OneStepAdder<ArrayBatch, ArrayBatch> =
            OneStepAdder::new(obs(0.0), act(0.0));
        adder.reset(obs(1.0));
        adder.add(obs(2.0), act(0.0), 0.0, true);
        adder.add(obs(3.0), act(0.0), 0.0, false);
    }
}

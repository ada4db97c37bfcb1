use burn::prelude::*;
use burn::tensor::TensorData;

use crate::env::jumper::{JumpAction, Observation};

pub trait ToTensorF<const D: usize>: Clone {
    fn to_tensor<B: Backend>(self, device: &B::Device) -> Tensor<B, D>;
}

impl ToTensorF<1> for f32 {
    fn to_tensor<B: Backend>(self, device: &<B as Backend>::Device) -> Tensor<B, 1> {
        Tensor::from_floats([self], device)
    }
}

impl ToTensorF<1> for Vec<f32> {
    fn to_tensor<B: Backend>(self, device: &<B as Backend>::Device) -> Tensor<B, 1> {
        let n = self.len();

        Tensor::from_data(TensorData::new(self, [n]).convert::<B::FloatElem>(), device)
    }
}

impl ToTensorF<1> for Observation {
    fn to_tensor<B: Backend>(self, device: &<B as Backend>::Device) -> Tensor<B, 1> {
        self.to_vec().to_tensor(device)
    }
}

impl ToTensorF<2> for Vec<Vec<f32>> {
    fn to_tensor<B: Backend>(self, device: &<B as Backend>::Device) -> Tensor<B, 2> {
        let n0 = self.len();
        let n1 = self.first().map_or(0, Vec::len);
        let data: Vec<f32> = self.concat();

        Tensor::from_data(
            TensorData::new(data, [n0, n1]).convert::<B::FloatElem>(),
            device,
        )
    }
}

impl ToTensorF<2> for Vec<Observation> {
    fn to_tensor<B: Backend>(self, device: &<B as Backend>::Device) -> Tensor<B, 2> {
        self.into_iter()
            .map(|o| o.to_vec())
            .collect::<Vec<_>>()
            .to_tensor(device)
    }
}

pub trait ToTensorI<const D: usize>: Clone {
    fn to_tensor<B: Backend>(self, device: &B::Device) -> Tensor<B, D, Int>;
}

impl ToTensorI<1> for usize {
    fn to_tensor<B: Backend>(self, device: &<B as Backend>::Device) -> Tensor<B, 1, Int> {
        Tensor::from_ints([self as i32], device)
    }
}

impl ToTensorI<1> for Vec<usize> {
    fn to_tensor<B: Backend>(self, device: &<B as Backend>::Device) -> Tensor<B, 1, Int> {
        let n = self.len();
        let data: Vec<i32> = self.into_iter().map(|x| x as i32).collect();

        Tensor::from_data(TensorData::new(data, [n]).convert::<B::IntElem>(), device)
    }
}

impl ToTensorI<1> for Vec<JumpAction> {
    fn to_tensor<B: Backend>(self, device: &<B as Backend>::Device) -> Tensor<B, 1, Int> {
        self.into_iter()
            .map(usize::from)
            .collect::<Vec<_>>()
            .to_tensor(device)
    }
}

pub trait ToTensorB<const D: usize>: Clone {
    fn to_tensor<B: Backend>(self, device: &B::Device) -> Tensor<B, D, Bool>;
}

impl ToTensorB<1> for bool {
    fn to_tensor<B: Backend>(self, device: &<B as Backend>::Device) -> Tensor<B, 1, Bool> {
        vec![self].to_tensor(device)
    }
}

impl ToTensorB<1> for Vec<bool> {
    fn to_tensor<B: Backend>(self, device: &<B as Backend>::Device) -> Tensor<B, 1, Bool> {
        let n = self.len();
        let data: Vec<i32> = self.into_iter().map(i32::from).collect();

        Tensor::<B, 1, Int>::from_data(TensorData::new(data, [n]).convert::<B::IntElem>(), device)
            .bool()
    }
}

#[cfg(test)]
mod test {
    use burn::{
        backend::NdArray,
        tensor::{Bool, Int, Tensor},
    };
    use glam::Vec2;

    use crate::{
        common::to_tensor::{ToTensorB, ToTensorI},
        env::jumper::{
            JumpAction, JumperConfig, JumpingAgent, Observation, ObstacleId, ObstacleSnapshot,
        },
    };

    use super::ToTensorF;

    fn observation() -> Observation {
        let agent = JumpingAgent::new(&JumperConfig::new());
        let closest = ObstacleSnapshot {
            id: ObstacleId(0),
            position: Vec2::new(4.0, 0.0),
            velocity: Vec2::new(-3.0, 0.0),
        };

        Observation::new(agent.state(), Some(&closest))
    }

    #[test]
    fn test_to_tensor_f32() {
        let d: f32 = 1.1;
        let t: Tensor<NdArray, 1> = d.to_tensor(&Default::default());

        assert_eq!(t.dims(), [1]);
        assert_eq!(t.into_scalar(), d);
    }

    #[test]
    fn test_to_tensor_vec_vec_f32() {
        let d: Vec<Vec<f32>> = vec![vec![1.1, 2.2], vec![3.3, 4.4], vec![1.0, 0.0]];
        let t: Tensor<NdArray, 2> = d.to_tensor(&Default::default());

        assert_eq!(t.dims(), [3, 2]);
    }

    #[test]
    fn test_observation_to_tensor() {
        let obs = observation();
        let t: Tensor<NdArray, 1> = obs.to_tensor(&Default::default());

        assert_eq!(t.dims(), [11]);
        let values = t.into_data().to_vec::<f32>().unwrap();
        assert_eq!(values, obs.to_vec());
    }

    #[test]
    fn test_observation_batch_to_tensor() {
        let batch = vec![observation(); 4];
        let t: Tensor<NdArray, 2> = batch.to_tensor(&Default::default());

        assert_eq!(t.dims(), [4, 11]);
    }

    #[test]
    fn test_to_tensor_usize() {
        let d: usize = 1;
        let t: Tensor<NdArray, 1, Int> = d.to_tensor(&Default::default());

        assert_eq!(t.dims(), [1]);
        assert_eq!(t.into_scalar() as usize, d);
    }

    #[test]
    fn test_actions_to_tensor() {
        let d = vec![JumpAction::Idle, JumpAction::Jump, JumpAction::Jump];
        let t: Tensor<NdArray, 1, Int> = d.to_tensor(&Default::default());

        assert_eq!(t.dims(), [3]);
        assert_eq!(t.sum().into_scalar() as usize, 2);
    }

    #[test]
    fn test_to_tensor_bool() {
        let d: bool = true;
        let t: Tensor<NdArray, 1, Bool> = d.to_tensor(&Default::default());

        assert_eq!(t.dims(), [1]);
        assert_eq!(t.into_scalar(), d);
    }

    #[test]
    fn test_to_tensor_vec_bool() {
        let d: Vec<bool> = vec![false, true];
        let t: Tensor<NdArray, 1, Bool> = d.to_tensor(&Default::default());

        assert_eq!(t.dims(), [2]);
    }
}

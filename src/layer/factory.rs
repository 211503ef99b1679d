use crate::model::{
    layer_params::{Conv2DParams, Padding, Pool2DParams},
    layer_type::LayerType,
};

use super::activations::ActivationType;

/// Declarative vocabulary the architectures stack their layers with.
pub struct Layers;

impl Layers {
    pub fn conv2d(filters: usize, kernel: usize, padding: Padding) -> LayerType {
        Self::conv2d_with(filters, kernel, kernel, 1, 1, padding)
    }

    pub fn conv2d_with(
        filters: usize,
        kernel_h: usize,
        kernel_w: usize,
        stride_h: usize,
        stride_w: usize,
        padding: Padding,
    ) -> LayerType {
        LayerType::Conv2D(Conv2DParams {
            filters,
            kernel_h,
            kernel_w,
            stride_h,
            stride_w,
            padding,
        })
    }

    pub fn relu() -> LayerType {
        LayerType::Activation(ActivationType::ReLU)
    }

    pub fn softmax() -> LayerType {
        LayerType::Activation(ActivationType::Softmax)
    }

    pub fn batch_norm(axis: i32) -> LayerType {
        LayerType::BatchNormalization { axis }
    }

    pub fn max_pool2d(size: usize) -> LayerType {
        LayerType::MaxPooling2D(Pool2DParams::square(size))
    }

    pub fn max_pool2d_with(
        pool_h: usize,
        pool_w: usize,
        stride_h: usize,
        stride_w: usize,
    ) -> LayerType {
        LayerType::MaxPooling2D(Pool2DParams {
            pool_h,
            pool_w,
            stride_h,
            stride_w,
        })
    }

    pub fn dropout(rate: f32) -> LayerType {
        LayerType::Dropout { rate }
    }

    pub fn flatten() -> LayerType {
        LayerType::Flatten
    }

    pub fn dense(units: usize) -> LayerType {
        LayerType::Dense { units }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::layer_type::LayerKind;

    #[test]
    fn conv2d_is_square_with_unit_stride() {
        let LayerType::Conv2D(params) = Layers::conv2d(32, 3, Padding::Same) else {
            panic!("expected a convolution");
        };
        assert_eq!((params.kernel_h, params.kernel_w), (3, 3));
        assert_eq!((params.stride_h, params.stride_w), (1, 1));
        assert_eq!(params.padding, Padding::Same);
        assert_eq!(params.filters, 32);
    }

    #[test]
    fn max_pool_strides_by_its_size() {
        assert_eq!(Layers::max_pool2d(2), Layers::max_pool2d_with(2, 2, 2, 2));
    }

    #[test]
    fn factory_kinds() {
        assert_eq!(Layers::relu().kind(), LayerKind::Activation);
        assert_eq!(Layers::batch_norm(-1).kind(), LayerKind::Normalization);
        assert_eq!(Layers::dropout(0.5).kind(), LayerKind::Dropout);
        assert_eq!(Layers::flatten().kind(), LayerKind::Flatten);
        assert_eq!(Layers::dense(10).kind(), LayerKind::Dense);
    }
}

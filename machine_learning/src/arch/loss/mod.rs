mod divergence;
mod loss_fn;
mod pointwise;

pub use loss_fn::LossFn;

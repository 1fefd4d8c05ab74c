mod act_fn;
mod softmax;

pub use act_fn::ActFn;
pub use softmax::{maxout, softmax, split_softmax};

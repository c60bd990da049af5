#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use fk_reflect as reflect;
pub use fk_utils as utils;

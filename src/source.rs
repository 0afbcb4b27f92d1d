pub(crate) mod asset_source;
pub(crate) mod contract;
pub(crate) mod dispatch;
pub(crate) mod image_source;
pub(crate) mod rate;
pub(crate) mod scale;

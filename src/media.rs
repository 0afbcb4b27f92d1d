pub(crate) mod ffprobe;
pub(crate) mod model;

mod status;

pub(crate) use status::{render_load_status, render_placeholder};

pub mod overlay_pass;

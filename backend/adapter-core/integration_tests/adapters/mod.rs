mod billing;
mod media;

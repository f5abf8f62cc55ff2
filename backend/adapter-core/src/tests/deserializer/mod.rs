mod feed;
mod lookup;
mod status;

mod get;
mod seed;
mod set;

mod helpers;
mod observations;

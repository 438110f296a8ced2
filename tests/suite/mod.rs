mod flows;
mod input;
mod persistence;
mod rendering;

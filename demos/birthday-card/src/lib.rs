use wasm_bindgen::prelude::*;
use fete_engine::*;

mod app;
mod balloons;
mod burst;
mod cake;
mod celebration;
mod content;
mod decor;
mod elements;
mod motion;
mod quiz;
mod sections;
use app::BirthdayCard;

fete_web::export_page!(BirthdayCard, "birthday-card", vectors);

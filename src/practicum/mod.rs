//! Практикум.Домашка API 客户端

pub mod client;

pub use client::{HomeworkSource, PracticumClient};

pub mod categorize;
pub mod compare;
pub mod dto;
pub mod growth;
pub mod handler;
pub mod kst;
pub mod pattern;
pub mod recommend;
pub mod service;

mod client;

pub use client::{Client, ClientPatch, CreateClientRequest, NewClient, UpdateClientRequest};

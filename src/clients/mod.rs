pub mod scheduler_client;

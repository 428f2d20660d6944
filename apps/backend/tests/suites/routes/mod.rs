mod correlation;
mod health;
mod profile;

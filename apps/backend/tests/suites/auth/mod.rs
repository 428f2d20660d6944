mod gate;
mod login;
mod register;

mod authenticate;
mod revoke;
mod verify;

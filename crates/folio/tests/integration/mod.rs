mod access;
mod history;

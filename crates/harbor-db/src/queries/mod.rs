mod bank;
mod kiosks;
mod mailboxes;
mod messages;
mod users;

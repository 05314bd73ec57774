mod canvas;
mod dialogs;
mod icons;
mod measurements;
mod prompt;
mod status;
mod top;

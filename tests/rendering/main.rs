mod langbar;
mod pages;

mod decode;
mod properties;

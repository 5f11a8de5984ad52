pub mod jwt_codec;

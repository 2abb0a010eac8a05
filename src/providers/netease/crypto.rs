//! 本模块用于加密发送给网易云音乐 EAPI 的请求。
//! 本实现仅用于加密网易云音乐 API 请求，不应用于实际安全目的。
//!
//! 加密逻辑来源于 <https://github.com/Binaryify/NeteaseCloudMusicApi>

use aes::{
    Aes128,
    cipher::{BlockSizeUser, generic_array::GenericArray},
};
use block_padding::Pkcs7;
use cipher::{BlockEncryptMut, KeyInit};
use ecb::Encryptor as EcbModeEncryptor;
use md5::{Digest, Md5 as Md5Hasher};

use crate::error::{LyricsHelperError, Result};

/// EAPI 加密中使用的固定 AES ECB 密钥
const EAPI_KEY_STR: &str = "e82ckenh8dichen8";

/// 实现 AES ECB 模式加密，专用于 EAPI。
///
/// # 参数
/// * `data_bytes` - 待加密的明文字节切片。
/// * `key_bytes` - AES 密钥字节切片 (必须为 16 字节)。
///
/// # 返回
/// - `Result<String>`: 加密后的数据的十六进制字符串 (大写)。
pub fn aes_ecb_encrypt_eapi(data_bytes: &[u8], key_bytes: &[u8]) -> Result<String> {
    let block_size = Aes128::block_size();
    if key_bytes.len() != block_size {
        return Err(LyricsHelperError::Encryption(format!(
            "EAPI AES 密钥长度必须为 {} 字节，但实际为 {}",
            block_size,
            key_bytes.len()
        )));
    }

    let key_ga = GenericArray::from_slice(key_bytes);
    let cipher = EcbModeEncryptor::<Aes128>::new(key_ga);

    let mut buffer = data_bytes.to_vec();
    let msg_len = buffer.len();
    let padded_len = (msg_len / block_size + 1) * block_size;
    buffer.resize(padded_len, 0);

    let ciphertext_slice = cipher
        .encrypt_padded_mut::<Pkcs7>(&mut buffer, msg_len)
        .map_err(|e| LyricsHelperError::Encryption(format!("AES ECB 加密失败: {e:?}")))?;

    Ok(hex::encode_upper(ciphertext_slice))
}

/// 准备 EAPI 请求的加密参数。
///
/// # 参数
/// * `url_path` - API 的 URL 路径段 (例如 "/api/song/lyric/v1")。
/// * `params_obj` - 原始请求参数对象 (需要实现 `serde::Serialize`)。
///
/// # 返回
/// - `Result<String>`: 最终加密后的参数的十六进制字符串。
pub fn prepare_eapi_params<T: serde::Serialize>(url_path: &str, params_obj: &T) -> Result<String> {
    let text = serde_json::to_string(params_obj)?;

    let message = format!("nobody{url_path}use{text}md5forencrypt");
    let mut md5_hasher = Md5Hasher::new();
    md5_hasher.update(message.as_bytes());
    let digest = hex::encode(md5_hasher.finalize());

    let data_to_encrypt_str = format!("{url_path}-36cd479b6b5-{text}-36cd479b6b5-{digest}");
    aes_ecb_encrypt_eapi(data_to_encrypt_str.as_bytes(), EAPI_KEY_STR.as_bytes())
}

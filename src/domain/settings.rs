/// Shop branding managed by the owner and stored by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShopSettings {
    pub shop_name: String,
    pub logo: Option<Logo>,
}

impl ShopSettings {
    pub fn named(shop_name: impl Into<String>) -> Self {
        Self {
            shop_name: shop_name.into(),
            logo: None,
        }
    }
}

/// Raw logo image bytes as uploaded by the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    bytes: Vec<u8>,
}

impl Logo {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

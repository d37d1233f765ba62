//! `shop` query parameter parsing.

use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use storefront_app::domain::stores::records::StoreName;

pub(crate) trait ShopParamExt {
    fn into_store_name(self) -> Result<StoreName, StatusError>;
}

impl ShopParamExt for QueryParam<String, false> {
    fn into_store_name(self) -> Result<StoreName, StatusError> {
        self.into_inner()
            .and_then(|shop| StoreName::parse(&shop).ok())
            .ok_or_else(|| StatusError::unprocessable_entity().brief("invalid request query"))
    }
}

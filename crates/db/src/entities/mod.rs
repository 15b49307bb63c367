//! `SeaORM` entity definitions.

pub mod accounts;
pub mod donations;
pub mod sea_orm_active_enums;
pub mod supply_requests;

//! Initial database migration.
//!
//! Creates the enums, tables, triggers and indexes for accounts, donations
//! and supply requests.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: TABLES
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(DONATIONS_SQL).await?;
        db.execute_unprepared(SUPPLY_REQUESTS_SQL).await?;

        // ============================================================
        // PART 3: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account roles
CREATE TYPE account_role AS ENUM (
    'admin',
    'school',
    'donor',
    'volunteer'
);

-- Moderation status shared by accounts, donations and supply requests
CREATE TYPE approval_status AS ENUM (
    'pending',
    'verified',
    'rejected',
    'completed'
);

-- Donation categories
CREATE TYPE donation_type AS ENUM (
    'books',
    'uniforms',
    'digital-devices',
    'stationery',
    'furniture',
    'funds',
    'other'
);

-- Supply request categories (no direct fund requests)
CREATE TYPE request_category AS ENUM (
    'books',
    'uniforms',
    'digital-devices',
    'stationery',
    'furniture',
    'other'
);

-- Supply request urgency
CREATE TYPE request_urgency AS ENUM ('low', 'medium', 'high');
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    role account_role NOT NULL,
    status approval_status NOT NULL DEFAULT 'pending',
    rejection_reason TEXT,

    -- School profile
    school_name VARCHAR(255),
    school_reg_no VARCHAR(100),
    school_type VARCHAR(50),
    province VARCHAR(100),
    district VARCHAR(100),
    address TEXT,
    school_contact VARCHAR(50),
    school_email VARCHAR(255),
    principal_name VARCHAR(255),
    principal_contact VARCHAR(50),
    website VARCHAR(255),
    registration_proof VARCHAR(500),
    verifying_authority VARCHAR(255),
    authority_contact VARCHAR(50),
    endorsement_letter VARCHAR(500),

    -- Donor profile
    organization_name VARCHAR(255),
    registration_number VARCHAR(100),
    organization_type VARCHAR(50),
    contact_number VARCHAR(50),
    identity_certificate VARCHAR(500),
    representative_name VARCHAR(255),
    representative_position VARCHAR(100),
    representative_email VARCHAR(255),
    representative_phone VARCHAR(50),
    reference_partner VARCHAR(255),

    -- Volunteer profile
    full_name VARCHAR(255),
    nic_front VARCHAR(500),
    nic_back VARCHAR(500),
    vehicle_type VARCHAR(20),
    availability VARCHAR(100),
    skills TEXT,

    last_login_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    -- Accounts are never completed; only donations and requests are
    CONSTRAINT chk_account_status CHECK (status <> 'completed')
);

CREATE INDEX idx_accounts_status ON accounts(status);
CREATE INDEX idx_accounts_role_status ON accounts(role, status);
";

const DONATIONS_SQL: &str = r"
CREATE TABLE donations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    donor_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
    organization_name VARCHAR(255) NOT NULL,
    contact_person VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    phone VARCHAR(50) NOT NULL,
    donation_type donation_type NOT NULL,
    purpose VARCHAR(255) NOT NULL,
    description TEXT NOT NULL,
    estimated_amount VARCHAR(255) NOT NULL,
    image_url VARCHAR(500),
    status approval_status NOT NULL DEFAULT 'pending',
    rejection_reason TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_donations_donor ON donations(donor_id);
CREATE INDEX idx_donations_status_created ON donations(status, created_at DESC);
";

const SUPPLY_REQUESTS_SQL: &str = r"
CREATE TABLE supply_requests (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    school_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
    school_name VARCHAR(255) NOT NULL,
    contact_person VARCHAR(255) NOT NULL,
    contact_email VARCHAR(255) NOT NULL,
    contact_phone VARCHAR(50) NOT NULL,
    category request_category NOT NULL,
    title VARCHAR(255) NOT NULL,
    description TEXT NOT NULL,
    quantity VARCHAR(100) NOT NULL,
    urgency request_urgency NOT NULL DEFAULT 'medium',
    location VARCHAR(255) NOT NULL,
    principal_letter VARCHAR(500),
    status approval_status NOT NULL DEFAULT 'pending',
    rejection_reason TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_requests_school ON supply_requests(school_id);
CREATE INDEX idx_requests_status_created ON supply_requests(status, created_at DESC);
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: touch_updated_at
-- Keeps updated_at current on every row update
-- ============================================================
CREATE OR REPLACE FUNCTION touch_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at := now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_accounts_touch
BEFORE UPDATE ON accounts
FOR EACH ROW
EXECUTE FUNCTION touch_updated_at();

CREATE TRIGGER trg_donations_touch
BEFORE UPDATE ON donations
FOR EACH ROW
EXECUTE FUNCTION touch_updated_at();

CREATE TRIGGER trg_supply_requests_touch
BEFORE UPDATE ON supply_requests
FOR EACH ROW
EXECUTE FUNCTION touch_updated_at();
";

const DROP_ALL_SQL: &str = r"
-- ============================================================
-- DROP ALL: Rollback migration
-- Order matters due to foreign key constraints
-- ============================================================

-- Drop triggers
DROP TRIGGER IF EXISTS trg_supply_requests_touch ON supply_requests;
DROP TRIGGER IF EXISTS trg_donations_touch ON donations;
DROP TRIGGER IF EXISTS trg_accounts_touch ON accounts;

-- Drop functions
DROP FUNCTION IF EXISTS touch_updated_at();

-- Drop tables (reverse order of creation)
DROP TABLE IF EXISTS supply_requests CASCADE;
DROP TABLE IF EXISTS donations CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;

-- Drop enums
DROP TYPE IF EXISTS request_urgency CASCADE;
DROP TYPE IF EXISTS request_category CASCADE;
DROP TYPE IF EXISTS donation_type CASCADE;
DROP TYPE IF EXISTS approval_status CASCADE;
DROP TYPE IF EXISTS account_role CASCADE;
";

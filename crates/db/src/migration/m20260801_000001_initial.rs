//! Initial database migration.
//!
//! Creates all core tables, enums, triggers, functions, and seed data.

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
        // PART 2: IDENTITY & PROFILES
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(PROFILES_SQL).await?;
        db.execute_unprepared(USER_ROLES_SQL).await?;

        // ============================================================
        // PART 3: AGENTS & STAFF
        // ============================================================
        db.execute_unprepared(AGENTS_SQL).await?;
        db.execute_unprepared(STAFF_BANK_ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 4: INVENTORY
        // ============================================================
        db.execute_unprepared(TRANSPORT_SQL).await?;
        db.execute_unprepared(SIGHTSEEING_SQL).await?;
        db.execute_unprepared(HOTELS_SQL).await?;
        db.execute_unprepared(RESTAURANTS_SQL).await?;

        // ============================================================
        // PART 5: PRICING
        // ============================================================
        db.execute_unprepared(PRICING_SQL).await?;

        // ============================================================
        // PART 6: SALES PIPELINE & QUOTES
        // ============================================================
        db.execute_unprepared(LEADS_SQL).await?;
        db.execute_unprepared(ENQUIRIES_SQL).await?;
        db.execute_unprepared(QUOTES_SQL).await?;
        db.execute_unprepared(BOOKINGS_SQL).await?;

        // ============================================================
        // PART 7: APP SETTINGS
        // ============================================================
        db.execute_unprepared(APP_SETTINGS_SQL).await?;

        // ============================================================
        // PART 8: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        // ============================================================
        // PART 9: SEED DATA
        // ============================================================
        db.execute_unprepared(SEED_TRANSPORT_TYPES_SQL).await?;
        db.execute_unprepared(SEED_PRICING_SQL).await?;

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
-- User roles
CREATE TYPE user_role AS ENUM (
    'admin',
    'manager',
    'staff',
    'agent'
);

-- Agent account status
CREATE TYPE agent_status AS ENUM ('pending', 'active', 'suspended');

-- Sales pipeline statuses
CREATE TYPE lead_status AS ENUM ('new', 'contacted', 'qualified', 'lost');
CREATE TYPE enquiry_status AS ENUM ('open', 'quoted', 'won', 'lost');
CREATE TYPE booking_status AS ENUM ('confirmed', 'completed', 'cancelled');
CREATE TYPE payment_status AS ENUM ('unpaid', 'partial', 'paid');

-- Quotes
CREATE TYPE quote_status AS ENUM ('draft', 'sent', 'accepted', 'rejected');
CREATE TYPE quote_item_kind AS ENUM (
    'hotel',
    'transport',
    'sightseeing',
    'restaurant',
    'other'
);

-- Pricing
CREATE TYPE markup_kind AS ENUM ('percentage', 'fixed');
";

const USERS_SQL: &str = r"
-- Auth users
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_users_email ON users(lower(email));
";

const PROFILES_SQL: &str = r"
-- Profiles: one per auth user, provisioned at signup
CREATE TABLE profiles (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    phone VARCHAR(32),
    company_name VARCHAR(255),
    role user_role NOT NULL DEFAULT 'agent',
    department VARCHAR(100),
    position VARCHAR(100),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_profiles_role ON profiles(role);
";

const USER_ROLES_SQL: &str = r"
-- Role assignments, mirrored from profiles.role by trigger
CREATE TABLE user_roles (
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    role user_role NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (user_id, role)
);
";

const AGENTS_SQL: &str = r"
-- Travel agency accounts
CREATE TABLE agents (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID REFERENCES users(id) ON DELETE SET NULL,
    agency_name VARCHAR(255) NOT NULL,
    contact_name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    phone VARCHAR(32),
    city VARCHAR(100),
    status agent_status NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_agents_status ON agents(status);
CREATE INDEX idx_agents_user ON agents(user_id) WHERE user_id IS NOT NULL;
";

const STAFF_BANK_ACCOUNTS_SQL: &str = r"
-- Staff payout details, one row per profile
CREATE TABLE staff_bank_accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    profile_id UUID NOT NULL UNIQUE REFERENCES profiles(id) ON DELETE CASCADE,
    account_holder VARCHAR(255) NOT NULL,
    account_number VARCHAR(34) NOT NULL,
    ifsc_code VARCHAR(11) NOT NULL,
    bank_name VARCHAR(255) NOT NULL,
    branch VARCHAR(255),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const TRANSPORT_SQL: &str = r"
-- Transport inventory
CREATE TABLE transport_types (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(100) NOT NULL UNIQUE,
    vehicle_class VARCHAR(100),
    seats INTEGER NOT NULL CHECK (seats > 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE transport_routes (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    origin VARCHAR(100) NOT NULL,
    destination VARCHAR(100) NOT NULL,
    transport_type_id UUID NOT NULL REFERENCES transport_types(id),
    distance_km NUMERIC(10, 2) NOT NULL CHECK (distance_km >= 0),
    duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0),
    base_fare NUMERIC(12, 2) NOT NULL CHECK (base_fare >= 0),
    currency VARCHAR(3) NOT NULL DEFAULT 'INR',
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_routes_endpoints ON transport_routes(origin, destination) WHERE is_active;

CREATE TABLE intermediate_stops (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    route_id UUID NOT NULL REFERENCES transport_routes(id) ON DELETE CASCADE,
    name VARCHAR(100) NOT NULL,
    position INTEGER NOT NULL CHECK (position > 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (route_id, position)
);
";

const SIGHTSEEING_SQL: &str = r"
-- Sightseeing inventory
CREATE TABLE sightseeing_options (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    city VARCHAR(100) NOT NULL,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    ticket_cost NUMERIC(12, 2) NOT NULL CHECK (ticket_cost >= 0),
    currency VARCHAR(3) NOT NULL DEFAULT 'INR',
    duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0),
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_sightseeing_city ON sightseeing_options(city) WHERE is_active;
";

const HOTELS_SQL: &str = r"
-- Hotel inventory
CREATE TABLE hotels (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    city VARCHAR(100) NOT NULL,
    name VARCHAR(255) NOT NULL,
    star_rating SMALLINT NOT NULL CHECK (star_rating BETWEEN 1 AND 5),
    address TEXT,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_hotels_city ON hotels(city) WHERE is_active;

CREATE TABLE hotel_room_rates (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    hotel_id UUID NOT NULL REFERENCES hotels(id) ON DELETE CASCADE,
    season VARCHAR(50) NOT NULL,
    room_type VARCHAR(100) NOT NULL,
    rate_per_night NUMERIC(12, 2) NOT NULL CHECK (rate_per_night >= 0),
    currency VARCHAR(3) NOT NULL DEFAULT 'INR',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (hotel_id, season, room_type)
);
";

const RESTAURANTS_SQL: &str = r"
-- Restaurant inventory
CREATE TABLE restaurants (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    city VARCHAR(100) NOT NULL,
    name VARCHAR(255) NOT NULL,
    cuisine VARCHAR(100),
    meal_type VARCHAR(50),
    cost_per_person NUMERIC(10, 2) NOT NULL CHECK (cost_per_person >= 0),
    currency VARCHAR(3) NOT NULL DEFAULT 'INR',
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_restaurants_city ON restaurants(city) WHERE is_active;
";

const PRICING_SQL: &str = r"
-- Markup configuration
CREATE TABLE pricing_configurations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(100) NOT NULL UNIQUE,
    currency VARCHAR(3) NOT NULL DEFAULT 'INR',
    is_active BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- At most one active configuration
CREATE UNIQUE INDEX idx_pricing_one_active ON pricing_configurations(is_active)
    WHERE is_active;

CREATE TABLE markup_slabs (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    config_id UUID NOT NULL REFERENCES pricing_configurations(id) ON DELETE CASCADE,
    position INTEGER NOT NULL CHECK (position > 0),
    min_amount NUMERIC(12, 2) NOT NULL CHECK (min_amount >= 0),
    max_amount NUMERIC(12, 2),
    markup_kind markup_kind NOT NULL,
    markup_value NUMERIC(12, 2) NOT NULL CHECK (markup_value >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (config_id, position),
    CONSTRAINT chk_slab_interval CHECK (max_amount IS NULL OR max_amount > min_amount)
);
";

const LEADS_SQL: &str = r"
-- Sales leads
CREATE TABLE sales_leads (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    customer_name VARCHAR(255) NOT NULL,
    customer_phone VARCHAR(32),
    customer_email VARCHAR(255),
    source VARCHAR(100),
    destination VARCHAR(100),
    travel_start DATE,
    travel_end DATE,
    adults INTEGER NOT NULL DEFAULT 1 CHECK (adults >= 0),
    children INTEGER NOT NULL DEFAULT 0 CHECK (children >= 0),
    status lead_status NOT NULL DEFAULT 'new',
    assigned_to UUID REFERENCES profiles(id) ON DELETE SET NULL,
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_lead_travel_window CHECK (
        travel_start IS NULL OR travel_end IS NULL OR travel_end >= travel_start
    )
);

CREATE INDEX idx_leads_status ON sales_leads(status, created_at DESC);
CREATE INDEX idx_leads_assignee ON sales_leads(assigned_to) WHERE assigned_to IS NOT NULL;
";

const ENQUIRIES_SQL: &str = r"
-- Sales enquiries
CREATE TABLE sales_enquiries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    lead_id UUID REFERENCES sales_leads(id) ON DELETE SET NULL,
    customer_name VARCHAR(255) NOT NULL,
    destination VARCHAR(100) NOT NULL,
    requirements JSONB,
    travel_start DATE,
    travel_end DATE,
    adults INTEGER NOT NULL DEFAULT 1 CHECK (adults >= 0),
    children INTEGER NOT NULL DEFAULT 0 CHECK (children >= 0),
    status enquiry_status NOT NULL DEFAULT 'open',
    assigned_to UUID REFERENCES profiles(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_enquiry_travel_window CHECK (
        travel_start IS NULL OR travel_end IS NULL OR travel_end >= travel_start
    )
);

CREATE INDEX idx_enquiries_status ON sales_enquiries(status, created_at DESC);
";

const QUOTES_SQL: &str = r"
-- Quotes and line items
CREATE TABLE quotes (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    enquiry_id UUID REFERENCES sales_enquiries(id) ON DELETE SET NULL,
    agent_id UUID REFERENCES agents(id) ON DELETE SET NULL,
    customer_name VARCHAR(255) NOT NULL,
    currency VARCHAR(3) NOT NULL DEFAULT 'INR',
    status quote_status NOT NULL DEFAULT 'draft',
    subtotal NUMERIC(12, 2) NOT NULL CHECK (subtotal >= 0),
    markup_amount NUMERIC(12, 2) NOT NULL CHECK (markup_amount >= 0),
    total_amount NUMERIC(12, 2) NOT NULL CHECK (total_amount >= 0),
    created_by UUID NOT NULL REFERENCES profiles(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_quotes_status ON quotes(status, created_at DESC);
CREATE INDEX idx_quotes_agent ON quotes(agent_id) WHERE agent_id IS NOT NULL;
CREATE INDEX idx_quotes_enquiry ON quotes(enquiry_id) WHERE enquiry_id IS NOT NULL;

CREATE TABLE quote_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    quote_id UUID NOT NULL REFERENCES quotes(id) ON DELETE CASCADE,
    kind quote_item_kind NOT NULL,
    reference_id UUID,
    description VARCHAR(500) NOT NULL,
    quantity INTEGER NOT NULL CHECK (quantity > 0),
    unit_price NUMERIC(12, 2) NOT NULL CHECK (unit_price >= 0),
    line_total NUMERIC(12, 2) NOT NULL CHECK (line_total >= 0),
    position INTEGER NOT NULL CHECK (position > 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (quote_id, position)
);
";

const BOOKINGS_SQL: &str = r"
-- Confirmed bookings
CREATE TABLE sales_bookings (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    enquiry_id UUID NOT NULL REFERENCES sales_enquiries(id),
    quote_id UUID NOT NULL REFERENCES quotes(id),
    travel_start DATE NOT NULL,
    travel_end DATE NOT NULL,
    total_amount NUMERIC(12, 2) NOT NULL CHECK (total_amount >= 0),
    currency VARCHAR(3) NOT NULL DEFAULT 'INR',
    payment_status payment_status NOT NULL DEFAULT 'unpaid',
    status booking_status NOT NULL DEFAULT 'confirmed',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_booking_travel_window CHECK (travel_end >= travel_start)
);

CREATE INDEX idx_bookings_status ON sales_bookings(status, created_at DESC);
";

const APP_SETTINGS_SQL: &str = r"
-- Key-value application settings
CREATE TABLE app_settings (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    key VARCHAR(100) NOT NULL UNIQUE,
    value JSONB NOT NULL,
    description TEXT,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: set_updated_at
-- Keeps updated_at current on every row update
-- ============================================================
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_users_updated_at
BEFORE UPDATE ON users
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_profiles_updated_at
BEFORE UPDATE ON profiles
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_agents_updated_at
BEFORE UPDATE ON agents
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_staff_bank_accounts_updated_at
BEFORE UPDATE ON staff_bank_accounts
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_transport_types_updated_at
BEFORE UPDATE ON transport_types
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_transport_routes_updated_at
BEFORE UPDATE ON transport_routes
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_sightseeing_updated_at
BEFORE UPDATE ON sightseeing_options
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_hotels_updated_at
BEFORE UPDATE ON hotels
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_hotel_room_rates_updated_at
BEFORE UPDATE ON hotel_room_rates
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_restaurants_updated_at
BEFORE UPDATE ON restaurants
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_pricing_configurations_updated_at
BEFORE UPDATE ON pricing_configurations
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_sales_leads_updated_at
BEFORE UPDATE ON sales_leads
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_sales_enquiries_updated_at
BEFORE UPDATE ON sales_enquiries
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_quotes_updated_at
BEFORE UPDATE ON quotes
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_sales_bookings_updated_at
BEFORE UPDATE ON sales_bookings
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_app_settings_updated_at
BEFORE UPDATE ON app_settings
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

-- ============================================================
-- FUNCTION: sync_user_role
-- Mirrors profiles.role into user_roles; the ON CONFLICT clause
-- makes concurrent provisioning attempts converge on one row
-- ============================================================
CREATE OR REPLACE FUNCTION sync_user_role()
RETURNS TRIGGER AS $$
BEGIN
    IF TG_OP = 'UPDATE' AND OLD.role IS DISTINCT FROM NEW.role THEN
        DELETE FROM user_roles
        WHERE user_id = NEW.user_id AND role = OLD.role;
    END IF;

    INSERT INTO user_roles (user_id, role)
    VALUES (NEW.user_id, NEW.role)
    ON CONFLICT (user_id, role) DO NOTHING;

    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_sync_user_role
AFTER INSERT OR UPDATE OF role ON profiles
FOR EACH ROW
EXECUTE FUNCTION sync_user_role();
";

const SEED_TRANSPORT_TYPES_SQL: &str = r"
-- Common vehicle classes
INSERT INTO transport_types (name, vehicle_class, seats) VALUES
    ('Sedan', 'standard', 4),
    ('SUV', 'standard', 6),
    ('Tempo Traveller', 'group', 12),
    ('Luxury Coach', 'group', 40)
ON CONFLICT (name) DO NOTHING;
";

const SEED_PRICING_SQL: &str = r"
-- Default markup configuration
WITH config AS (
    INSERT INTO pricing_configurations (name, currency, is_active)
    VALUES ('Standard INR', 'INR', true)
    ON CONFLICT (name) DO NOTHING
    RETURNING id
)
INSERT INTO markup_slabs (config_id, position, min_amount, max_amount, markup_kind, markup_value)
SELECT id, s.position, s.min_amount, s.max_amount, s.markup_kind::markup_kind, s.markup_value
FROM config,
    (VALUES
        (1, 0.00, 10000.00, 'percentage', 12.00),
        (2, 10000.00, 50000.00, 'percentage', 10.00),
        (3, 50000.00, NULL::numeric, 'fixed', 4000.00)
    ) AS s(position, min_amount, max_amount, markup_kind, markup_value);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS app_settings CASCADE;
DROP TABLE IF EXISTS sales_bookings CASCADE;
DROP TABLE IF EXISTS quote_items CASCADE;
DROP TABLE IF EXISTS quotes CASCADE;
DROP TABLE IF EXISTS sales_enquiries CASCADE;
DROP TABLE IF EXISTS sales_leads CASCADE;
DROP TABLE IF EXISTS markup_slabs CASCADE;
DROP TABLE IF EXISTS pricing_configurations CASCADE;
DROP TABLE IF EXISTS restaurants CASCADE;
DROP TABLE IF EXISTS hotel_room_rates CASCADE;
DROP TABLE IF EXISTS hotels CASCADE;
DROP TABLE IF EXISTS sightseeing_options CASCADE;
DROP TABLE IF EXISTS intermediate_stops CASCADE;
DROP TABLE IF EXISTS transport_routes CASCADE;
DROP TABLE IF EXISTS transport_types CASCADE;
DROP TABLE IF EXISTS staff_bank_accounts CASCADE;
DROP TABLE IF EXISTS agents CASCADE;
DROP TABLE IF EXISTS user_roles CASCADE;
DROP TABLE IF EXISTS profiles CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP FUNCTION IF EXISTS sync_user_role() CASCADE;
DROP FUNCTION IF EXISTS set_updated_at() CASCADE;

DROP TYPE IF EXISTS markup_kind CASCADE;
DROP TYPE IF EXISTS quote_item_kind CASCADE;
DROP TYPE IF EXISTS quote_status CASCADE;
DROP TYPE IF EXISTS payment_status CASCADE;
DROP TYPE IF EXISTS booking_status CASCADE;
DROP TYPE IF EXISTS enquiry_status CASCADE;
DROP TYPE IF EXISTS lead_status CASCADE;
DROP TYPE IF EXISTS agent_status CASCADE;
DROP TYPE IF EXISTS user_role CASCADE;
";

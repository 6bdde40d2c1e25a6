//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// Pixels per world unit. Sprite and fixture sizes are authored in pixels.
pub const PPM: f32 = 100.0;

// --- Spawn grid ---

/// Lowest valid spawn column (inclusive).
pub const SPAWN_X_BASE: i32 = 3;

/// Spawn column cap (exclusive).
pub const SPAWN_X_CAP: i32 = 106;

/// Lowest valid spawn row (inclusive).
pub const SPAWN_Y_BASE: i32 = 3;

/// Spawn row cap (exclusive).
pub const SPAWN_Y_CAP: i32 = 106;

/// Half extent of the fleet spawn box around a college, in pixels.
pub const FLEET_SPAWN_HALF_EXTENT_PX: i32 = 1000;

/// Attempts before a random spawn search gives up.
pub const MAX_SPAWN_ATTEMPTS: u32 = 1000;

/// Land radius (tiles) blocked around each college.
pub const COLLEGE_FOOTPRINT_RADIUS: i32 = 2;

// --- Player ---

/// Starting health shown on the HUD.
pub const PLAYER_START_HEALTH: i32 = 100;

/// Base top speed (units/s).
pub const PLAYER_BASE_MAX_SPEED: f32 = 4.0;

/// Base acceleration (units/s per tick of input).
pub const PLAYER_BASE_ACCELERATION: f32 = 0.1;

/// Base delay between shots (seconds).
pub const PLAYER_BASE_SHOOTING_DELAY: f32 = 0.5;

/// Base cannonball speed (units/s).
pub const PLAYER_BASE_CANNON_VELOCITY: i32 = 5;

/// Velocity retained per tick when there is no steering input.
pub const PLAYER_DRAG: f32 = 0.98;

/// Player hull sensor radius (55 px).
pub const PLAYER_RADIUS: f32 = 55.0 / PPM;

/// Player spawn offset from Alcuin (world units).
pub const PLAYER_SPAWN_OFFSET: (f32, f32) = (0.0, -4.0);

// --- Colleges ---

/// College health at full strength.
pub const COLLEGE_MAX_HEALTH: i32 = 100;

/// Damage a college takes per hit before the difficulty factor.
pub const COLLEGE_BASE_DAMAGE: i32 = 5;

/// College sensor radius (55 px).
pub const COLLEGE_RADIUS: f32 = 55.0 / PPM;

/// College sprite size in world units (64 x 110 px).
pub const COLLEGE_SIZE: (f32, f32) = (64.0 / PPM, 110.0 / PPM);

/// Wall segment sensor radius around a college.
pub const COLLEGE_WALL_RADIUS: f32 = 0.6;

/// Distance of each wall segment from the college centre.
pub const COLLEGE_WALL_OFFSET: f32 = 1.2;

/// Points for destroying a hostile college.
pub const COLLEGE_DESTROY_POINTS: i32 = 100;

/// Exclusive upper bound of the random coin reward for a college.
pub const COLLEGE_DESTROY_MAX_COINS: i32 = 10;

/// Seconds between college volleys.
pub const COLLEGE_FIRE_INTERVAL: f32 = 1.0;

/// Range at which a college opens fire on the player.
pub const COLLEGE_FIRE_RANGE: f32 = 8.0;

/// Speed of college cannonballs (units/s).
pub const COLLEGE_FIRE_SPEED: f32 = 3.0;

/// Health the player loses per college hit.
pub const COLLEGE_FIRE_DAMAGE: i32 = 15;

// --- Enemy ships ---

/// Enemy ship health at full strength.
pub const SHIP_MAX_HEALTH: i32 = 100;

/// Damage an enemy ship takes per hit.
pub const SHIP_BASE_DAMAGE: i32 = 20;

/// Enemy ship hull sensor radius (55 px).
pub const SHIP_RADIUS: f32 = 55.0 / PPM;

/// Pursuit speed of hostile ships (units/s).
pub const SHIP_SPEED: f32 = 1.5;

/// Range at which hostile ships start chasing the player.
pub const SHIP_AGGRO_RANGE: f32 = 6.0;

/// Seconds between ship volleys.
pub const SHIP_FIRE_INTERVAL: f32 = 2.0;

/// Range at which ships open fire.
pub const SHIP_FIRE_RANGE: f32 = 4.0;

/// Speed of ship cannonballs (units/s).
pub const SHIP_FIRE_SPEED: f32 = 3.5;

/// Health the player loses per ship hit.
pub const SHIP_FIRE_DAMAGE: i32 = 5;

/// Points for sinking a hostile ship.
pub const SHIP_SINK_POINTS: i32 = 20;

/// Coins for sinking a hostile ship.
pub const SHIP_SINK_COINS: i32 = 10;

// --- Cannonballs ---

/// Cannonball sensor radius (5 px).
pub const CANNONBALL_RADIUS: f32 = 5.0 / PPM;

/// Seconds a cannonball flies before sinking.
pub const CANNONBALL_LIFETIME: f32 = 2.0;

// --- Power-ups ---

/// Power-up sensor radius (24 px).
pub const POWER_UP_RADIUS: f32 = 24.0 / PPM;

/// Power-up sprite size in world units (48 px square).
pub const POWER_UP_SIZE: f32 = 48.0 / PPM;

/// Speed boost duration (seconds).
pub const SPEED_BOOST_DURATION: f32 = 20.0;

/// Faster shooting duration (seconds).
pub const FASTER_SHOOTING_DURATION: f32 = 20.0;

/// Absorption heart display duration (seconds).
pub const ABSORPTION_HEART_DURATION: f32 = 10.0;

/// Max speed increase from a speed boost (percent).
pub const SPEED_BOOST_MAX_SPEED_PERCENT: f32 = 10.0;

/// Acceleration increase from a speed boost (percent).
pub const SPEED_BOOST_ACCELERATION_PERCENT: f32 = 15.0;

/// Shooting delay reduction from faster shooting (percent).
pub const FASTER_SHOOTING_DELAY_PERCENT: f32 = 30.0;

/// Health restored by an absorption heart.
pub const ABSORPTION_HEART_HEAL: i32 = 10;

// --- Gold shop ---

pub const FASTER_CANNON_PRICE: i32 = 50;
pub const HEALTH_BOOST_PRICE: i32 = 75;
pub const INCREASE_CANNON_DAMAGE_PRICE: i32 = 150;
pub const MYSTERY_ITEM_PRICE: i32 = 400;

pub const FASTER_CANNON_MULTIPLIER: f32 = 1.2;
pub const HEALTH_BOOST_VALUE: i32 = 50;
pub const INCREASE_CANNON_DAMAGE_MULTIPLIER: f32 = 1.2;

/// Cannon velocity cap for repeated faster-cannon purchases.
pub const MAX_CANNON_VELOCITY: f32 = 12.0;

// --- Persistence ---

/// Save format version written into every save file.
pub const SAVE_VERSION: u32 = 1;

//! # Lexicon Tables
//!
//! Every word the parsers understand lives here, as ordered
//! [`KeywordRule`] slices. Earlier rows win when a table is evaluated with
//! [`first_match`](crate::rules::first_match).

use grimoire_shared::{
    AnimationPreset, BaseShape, CharacterType, Color, DistortionKind, FogConfig, LightingPreset, ParticleConfig,
    ParticleKind, PostProcessing, SceneAnimationKind, TextureHint, Theme,
};

use crate::rules::KeywordRule;

// =============================================================================
// SHAPES
// =============================================================================

/// Shape vocabulary, matched as whole words.
pub static SHAPE_WORDS: &[KeywordRule<BaseShape>] = &[
    KeywordRule::words(&["box", "cube", "crate", "block"], BaseShape::Box),
    KeywordRule::words(&["sphere", "orb", "ball", "globe", "planet"], BaseShape::Sphere),
    KeywordRule::words(&["cylinder", "pillar", "column", "tube"], BaseShape::Cylinder),
    KeywordRule::words(&["torus", "ring", "donut", "halo"], BaseShape::Torus),
    KeywordRule::words(&["cone", "pyramid", "spike", "spire"], BaseShape::Cone),
    KeywordRule::words(
        &["text", "word", "words", "letters", "headline", "title", "typography", "sign"],
        BaseShape::Text,
    ),
    KeywordRule::words(&["spiral", "helix", "corkscrew", "vortex", "tornado"], BaseShape::Twisted),
    KeywordRule::words(&["fractal", "sierpinski", "recursive"], BaseShape::Fractal),
    KeywordRule::words(
        &["tree", "tentacle", "tentacles", "branch", "branches", "roots", "vine", "coral"],
        BaseShape::Organic,
    ),
    KeywordRule::words(&["arch", "archway", "gateway", "doorway", "window"], BaseShape::Extrusion),
];

/// Contextual shape cues, matched as substrings after the word table.
pub static SHAPE_CONTEXT: &[KeywordRule<BaseShape>] = &[
    KeywordRule::substrings(
        &["cathedral", "church", "chapel", "gothic", "temple", "tower", "castle", "building", "monument"],
        BaseShape::Extrusion,
    ),
    KeywordRule::substrings(&["tentacl", "organism", "flesh"], BaseShape::Organic),
    KeywordRule::substrings(&["crystal", "recursive"], BaseShape::Fractal),
];

// =============================================================================
// HORROR
// =============================================================================

/// Horror vocabulary with a curated 1–10 intensity per word.
pub static HORROR_WORDS: &[(&str, u8)] = &[
    ("terror", 9),
    ("terrifying", 9),
    ("gore", 9),
    ("horrific", 8),
    ("grotesque", 8),
    ("macabre", 8),
    ("nightmare", 8),
    ("nightmarish", 8),
    ("demonic", 8),
    ("demon", 8),
    ("hell", 8),
    ("hellish", 8),
    ("infernal", 8),
    ("blood", 8),
    ("bloody", 8),
    ("corpse", 8),
    ("horror", 7),
    ("undead", 7),
    ("zombie", 7),
    ("rotting", 7),
    ("death", 7),
    ("abyss", 7),
    ("haunted", 6),
    ("sinister", 6),
    ("evil", 6),
    ("cursed", 6),
    ("skull", 6),
    ("decayed", 6),
    ("decaying", 6),
    ("dead", 6),
    ("dread", 6),
    ("scary", 5),
    ("creepy", 5),
    ("ghost", 5),
    ("ghostly", 5),
    ("spectral", 5),
    ("skeleton", 5),
    ("twisted", 5),
    ("wicked", 5),
    ("ominous", 5),
    ("eerie", 4),
    ("spooky", 4),
    ("bone", 4),
    ("bones", 4),
    ("dark", 3),
    ("shadow", 3),
    ("shadows", 3),
    ("gloomy", 3),
];

/// One-off boosts added to the averaged horror intensity.
pub static HORROR_BOOSTS: &[(&str, i32)] = &[
    ("blood", 3),
    ("nightmare", 2),
    ("terror", 2),
    ("death", 2),
    ("corpse", 2),
];

// =============================================================================
// THEME
// =============================================================================

/// Editorial cues, matched as substrings.
pub static EDITORIAL_CUES: &[&str] = &[
    "editorial",
    "magazine",
    "newspaper",
    "headline",
    "typography",
    "print",
    "poster",
    "article",
    "layout",
    "vogue",
];

/// Cinematic cues, matched as substrings.
pub static CINEMATIC_CUES: &[&str] = &[
    "cinematic",
    "film",
    "movie",
    "epic",
    "dramatic",
    "blockbuster",
    "widescreen",
    "trailer",
    "noir",
];

/// Surface defaults per theme: (color, roughness, metalness).
#[must_use]
pub const fn theme_surface(theme: Theme) -> (Color, f32, f32) {
    match theme {
        Theme::Horror => (Color::from_hex(0x2B_1B1B), 0.8, 0.2),
        Theme::Editorial => (Color::from_hex(0xF5_F5F0), 0.6, 0.0),
        Theme::Cinematic => (Color::from_hex(0x88_99AA), 0.4, 0.5),
        Theme::Hybrid => (Color::from_hex(0x3A_2A2A), 0.6, 0.3),
        Theme::Abstract => (Color::from_hex(0x9B_7FD4), 0.5, 0.3),
    }
}

// =============================================================================
// COLOR
// =============================================================================

/// Named colors. Evaluated in prompt order.
pub static COLOR_WORDS: &[KeywordRule<Color>] = &[
    KeywordRule::words(&["red"], Color::from_hex(0xFF_0000)),
    KeywordRule::words(&["crimson"], Color::from_hex(0xDC_143C)),
    KeywordRule::words(&["scarlet"], Color::from_hex(0xFF_2400)),
    KeywordRule::words(&["orange"], Color::from_hex(0xFF_8C00)),
    KeywordRule::words(&["amber"], Color::from_hex(0xFF_BF00)),
    KeywordRule::words(&["gold", "golden"], Color::from_hex(0xFF_D700)),
    KeywordRule::words(&["yellow"], Color::from_hex(0xFF_FF00)),
    KeywordRule::words(&["green"], Color::from_hex(0x00_C040)),
    KeywordRule::words(&["emerald"], Color::from_hex(0x50_C878)),
    KeywordRule::words(&["lime"], Color::from_hex(0x32_CD32)),
    KeywordRule::words(&["teal"], Color::from_hex(0x00_8080)),
    KeywordRule::words(&["cyan"], Color::from_hex(0x00_FFFF)),
    KeywordRule::words(&["blue"], Color::from_hex(0x00_50FF)),
    KeywordRule::words(&["azure"], Color::from_hex(0x00_7FFF)),
    KeywordRule::words(&["navy"], Color::from_hex(0x00_0080)),
    KeywordRule::words(&["purple"], Color::from_hex(0x80_0080)),
    KeywordRule::words(&["violet"], Color::from_hex(0x8F_00FF)),
    KeywordRule::words(&["magenta"], Color::from_hex(0xFF_00FF)),
    KeywordRule::words(&["pink"], Color::from_hex(0xFF_69B4)),
    KeywordRule::words(&["white"], Color::from_hex(0xFF_FFFF)),
    KeywordRule::words(&["ivory"], Color::from_hex(0xFF_FFF0)),
    KeywordRule::words(&["black"], Color::from_hex(0x0A_0A0A)),
    KeywordRule::words(&["obsidian"], Color::from_hex(0x1B_1B24)),
    KeywordRule::words(&["gray", "grey"], Color::from_hex(0x80_8080)),
    KeywordRule::words(&["silver"], Color::from_hex(0xC0_C0C0)),
    KeywordRule::words(&["brown"], Color::from_hex(0x8B_4513)),
    KeywordRule::words(&["bronze"], Color::from_hex(0xCD_7F32)),
    KeywordRule::words(&["copper"], Color::from_hex(0xB8_7333)),
];

// =============================================================================
// MATERIAL CUES
// =============================================================================

/// Surface cue found in a scene prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialCue {
    /// Self-illumination
    Glow,
    /// Transmissive glass
    Glass,
    /// Partially see-through
    Ghostly,
    /// Bare metal
    Metallic,
    /// Matte, weathered
    Rough,
    /// Lacquered
    Glossy,
    /// Edges only
    Wireframe,
}

/// Surface cues.
pub static MATERIAL_CUES: &[KeywordRule<MaterialCue>] = &[
    KeywordRule::words(
        &["glow", "glowing", "glows", "luminous", "radiant", "emissive", "incandescent", "burning", "fiery"],
        MaterialCue::Glow,
    ),
    KeywordRule::words(&["glass", "glassy", "crystal", "crystalline", "transparent", "translucent"], MaterialCue::Glass),
    KeywordRule::words(&["ghost", "ghostly", "spectral", "ethereal", "phantom", "wraith"], MaterialCue::Ghostly),
    KeywordRule::words(
        &["metal", "metallic", "chrome", "steel", "iron", "brass", "bronze", "copper"],
        MaterialCue::Metallic,
    ),
    KeywordRule::words(&["rough", "rugged", "coarse", "stone", "stony", "rocky", "weathered"], MaterialCue::Rough),
    KeywordRule::words(&["glossy", "shiny", "polished", "lacquered", "wet", "glistening"], MaterialCue::Glossy),
    KeywordRule::words(&["wireframe", "wire-frame", "wireframed"], MaterialCue::Wireframe),
];

// =============================================================================
// MODIFIERS & DISTORTIONS
// =============================================================================

/// Boolean geometry modifier named by a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierFlag {
    /// Helical twist
    Twisted,
    /// Noise shrink
    Decayed,
    /// Outward cracks
    Fractured,
    /// Sculpted jitter
    Organic,
    /// Inner shell
    Hollow,
    /// Exaggerated extremities
    Sharp,
    /// Softened extremities
    Smooth,
}

/// Modifier vocabulary.
pub static MODIFIER_WORDS: &[KeywordRule<ModifierFlag>] = &[
    KeywordRule::words(
        &["twisted", "twisting", "spiraling", "spiralling", "warped", "contorted", "writhing"],
        ModifierFlag::Twisted,
    ),
    KeywordRule::words(
        &["decayed", "decaying", "rotting", "rotten", "crumbling", "ruined", "withered"],
        ModifierFlag::Decayed,
    ),
    KeywordRule::words(&["fractured", "cracked", "broken", "splintered", "fragmented"], ModifierFlag::Fractured),
    KeywordRule::words(&["organic", "fleshy", "living", "biological", "veined"], ModifierFlag::Organic),
    KeywordRule::words(&["hollow", "hollowed", "empty", "shell"], ModifierFlag::Hollow),
    KeywordRule::words(&["sharp", "spiky", "jagged", "angular", "pointed", "bladed"], ModifierFlag::Sharp),
    KeywordRule::words(&["smooth", "soft", "rounded", "sleek", "flowing"], ModifierFlag::Smooth),
];

/// Distortion vocabulary. Evaluated in prompt order.
pub static DISTORTION_WORDS: &[KeywordRule<DistortionKind>] = &[
    KeywordRule::words(&["noisy", "distorted", "bumpy", "lumpy", "turbulent"], DistortionKind::Noise),
    KeywordRule::words(&["swirling", "swirled", "wrung"], DistortionKind::Twist),
    KeywordRule::words(&["disintegrating", "putrid", "festering"], DistortionKind::Decay),
    KeywordRule::words(&["eroded", "erosion", "pitted", "corroded"], DistortionKind::Erosion),
    KeywordRule::words(&["stretched", "elongated", "stretching"], DistortionKind::Stretch),
    KeywordRule::words(&["melting", "melted", "molten", "dripping", "liquid"], DistortionKind::Melt),
    KeywordRule::words(&["shattered", "shattering", "exploding", "exploded", "burst"], DistortionKind::Shatter),
    KeywordRule::words(&["pulsing", "pulsating", "throbbing", "beating", "heartbeat"], DistortionKind::Pulse),
    KeywordRule::words(&["glitch", "glitched", "glitchy", "corrupted", "digital"], DistortionKind::Glitch),
];

// =============================================================================
// SCENE ANIMATION
// =============================================================================

/// Object motion vocabulary.
pub static SCENE_ANIMATION_WORDS: &[KeywordRule<SceneAnimationKind>] = &[
    KeywordRule::words(
        &["rotating", "spinning", "spin", "rotate", "revolving", "turning"],
        SceneAnimationKind::Rotate,
    ),
    KeywordRule::words(&["floating", "hovering", "levitating", "drifting"], SceneAnimationKind::Float),
    KeywordRule::words(&["pulsing", "pulsating", "throbbing", "beating"], SceneAnimationKind::Pulse),
    KeywordRule::words(&["flickering", "flicker", "strobing", "sputtering"], SceneAnimationKind::Flicker),
    KeywordRule::words(&["breathing", "breathes", "heaving"], SceneAnimationKind::Breathe),
    KeywordRule::words(&["orbiting", "orbit", "circling"], SceneAnimationKind::Orbit),
];

// =============================================================================
// ATMOSPHERE
// =============================================================================

/// Named atmosphere bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtmospherePreset {
    /// Low fog, dust, eerie light
    Haunted,
    /// Dense pale fog
    Foggy,
    /// Dark background, neon light, bloom
    Neon,
    /// Dramatic light and film treatment
    Cinematic,
    /// Clean studio light
    Editorial,
    /// Moonlight, spores, bloom
    Ethereal,
    /// Embers, red fog
    Infernal,
}

/// Everything an atmosphere preset contributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereBundle {
    /// Fog, if any.
    pub fog: Option<FogConfig>,
    /// Particles, if any.
    pub particles: Option<ParticleConfig>,
    /// Lighting rig.
    pub lighting: LightingPreset,
    /// Post effects.
    pub post: PostProcessing,
    /// Clear color.
    pub background: Option<Color>,
}

impl AtmospherePreset {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Haunted => "haunted",
            Self::Foggy => "foggy",
            Self::Neon => "neon",
            Self::Cinematic => "cinematic",
            Self::Editorial => "editorial",
            Self::Ethereal => "ethereal",
            Self::Infernal => "infernal",
        }
    }

    /// The bundle this preset selects.
    #[must_use]
    pub const fn bundle(self) -> AtmosphereBundle {
        const NONE: PostProcessing = PostProcessing {
            bloom: false,
            film_grain: false,
            vignette: false,
            chromatic_aberration: false,
            glitch: false,
        };
        match self {
            Self::Haunted => AtmosphereBundle {
                fog: Some(fog(0x1A_1A2E, 2.0, 15.0)),
                particles: Some(ParticleConfig::of(ParticleKind::Dust)),
                lighting: LightingPreset::Eerie,
                post: PostProcessing {
                    vignette: true,
                    film_grain: true,
                    ..NONE
                },
                background: Some(Color::from_hex(0x0A_0A12)),
            },
            Self::Foggy => AtmosphereBundle {
                fog: Some(fog(0xB0_B8C0, 1.0, 12.0)),
                particles: None,
                lighting: LightingPreset::Neutral,
                post: NONE,
                background: Some(Color::from_hex(0x90_98A0)),
            },
            Self::Neon => AtmosphereBundle {
                fog: None,
                particles: None,
                lighting: LightingPreset::Neon,
                post: PostProcessing {
                    bloom: true,
                    chromatic_aberration: true,
                    ..NONE
                },
                background: Some(Color::from_hex(0x05_010F)),
            },
            Self::Cinematic => AtmosphereBundle {
                fog: None,
                particles: None,
                lighting: LightingPreset::Dramatic,
                post: PostProcessing {
                    bloom: true,
                    vignette: true,
                    film_grain: true,
                    ..NONE
                },
                background: None,
            },
            Self::Editorial => AtmosphereBundle {
                fog: None,
                particles: None,
                lighting: LightingPreset::Studio,
                post: NONE,
                background: Some(Color::from_hex(0xF5_F5F0)),
            },
            Self::Ethereal => AtmosphereBundle {
                fog: None,
                particles: Some(ParticleConfig::of(ParticleKind::Spores)),
                lighting: LightingPreset::Moonlight,
                post: PostProcessing { bloom: true, ..NONE },
                background: None,
            },
            Self::Infernal => AtmosphereBundle {
                fog: Some(fog(0x3A_0A00, 3.0, 20.0)),
                particles: Some(ParticleConfig::of(ParticleKind::Embers)),
                lighting: LightingPreset::Dramatic,
                post: PostProcessing { bloom: true, ..NONE },
                background: Some(Color::from_hex(0x1A_0500)),
            },
        }
    }
}

const fn fog(hex: u32, near: f32, far: f32) -> FogConfig {
    FogConfig {
        color: Color::from_hex(hex),
        near,
        far,
    }
}

/// Fog used when a prompt asks for fog without a preset.
pub const DEFAULT_FOG: FogConfig = fog(0x80_8890, 2.0, 20.0);

/// Atmosphere presets, first row wins.
pub static ATMOSPHERE_PRESETS: &[KeywordRule<AtmospherePreset>] = &[
    KeywordRule::words(&["haunted", "spooky", "graveyard", "cemetery"], AtmospherePreset::Haunted),
    KeywordRule::words(&["foggy", "misty", "murky", "hazy"], AtmospherePreset::Foggy),
    KeywordRule::words(&["neon", "cyberpunk", "synthwave"], AtmospherePreset::Neon),
    KeywordRule::words(&["cinematic", "filmic", "blockbuster"], AtmospherePreset::Cinematic),
    KeywordRule::words(&["editorial", "magazine", "print"], AtmospherePreset::Editorial),
    KeywordRule::words(&["ethereal", "heavenly", "celestial", "dreamy", "angelic"], AtmospherePreset::Ethereal),
    KeywordRule::words(&["infernal", "hellish", "hell", "volcanic"], AtmospherePreset::Infernal),
];

/// Words that ask for fog.
pub static FOG_WORDS: &[&str] = &["fog", "foggy", "mist", "misty", "haze", "hazy"];

/// Particle vocabulary, first row wins.
pub static PARTICLE_WORDS: &[KeywordRule<ParticleKind>] = &[
    KeywordRule::words(&["embers", "ember", "cinders"], ParticleKind::Embers),
    KeywordRule::words(&["ash", "ashes", "ashen"], ParticleKind::Ash),
    KeywordRule::words(&["dust", "dusty"], ParticleKind::Dust),
    KeywordRule::words(&["sparks", "sparkling", "sparkles"], ParticleKind::Sparks),
    KeywordRule::words(&["spores", "pollen"], ParticleKind::Spores),
    KeywordRule::words(&["snow", "snowy", "snowing", "snowflakes"], ParticleKind::Snow),
];

/// Lighting vocabulary, first row wins.
pub static LIGHTING_WORDS: &[KeywordRule<LightingPreset>] = &[
    KeywordRule::words(&["dramatic"], LightingPreset::Dramatic),
    KeywordRule::words(&["moonlit", "moonlight", "moonlighted"], LightingPreset::Moonlight),
    KeywordRule::words(&["candlelit", "candlelight", "candle", "candles"], LightingPreset::Candlelight),
    KeywordRule::words(&["neon"], LightingPreset::Neon),
    KeywordRule::words(&["eerie"], LightingPreset::Eerie),
    KeywordRule::words(&["studio"], LightingPreset::Studio),
];

/// Words that switch on the glitch post effect.
pub static GLITCH_POST_WORDS: &[&str] = &["glitch", "glitched", "glitchy"];

// =============================================================================
// CHARACTERS
// =============================================================================

/// Body-plan vocabulary, first row wins.
pub static CHARACTER_TYPE_WORDS: &[KeywordRule<CharacterType>] = &[
    KeywordRule::words(
        &[
            "person", "man", "woman", "human", "knight", "warrior", "wizard", "witch", "soldier", "robot",
            "android", "elf", "vampire", "zombie", "girl", "boy", "king", "queen", "prince", "princess",
            "pirate", "ninja", "samurai", "mage", "sorcerer", "hunter", "villager", "cyborg", "goblin", "orc",
            "troll", "golem",
        ],
        CharacterType::Humanoid,
    ),
    KeywordRule::words(
        &[
            "creature", "monster", "beast", "dragon", "dog", "cat", "wolf", "toad", "frog", "spider", "bird",
            "lizard", "snake", "bear", "fox", "horse", "rat", "bat", "owl", "raven", "crow", "fish", "shark",
            "octopus", "slime", "insect", "beetle", "scorpion", "griffin", "unicorn", "hydra", "kraken", "demon",
        ],
        CharacterType::Creature,
    ),
    KeywordRule::words(
        &[
            "chair", "lamp", "sword", "box", "crate", "table", "barrel", "chest", "book", "potion", "shield",
            "staff", "wand", "key", "door", "statue", "vase", "bottle", "clock", "mirror", "lantern", "coin",
            "gem",
        ],
        CharacterType::Object,
    ),
];

/// Body-plan fallbacks, matched as substrings.
pub static CHARACTER_TYPE_CONTEXT: &[KeywordRule<CharacterType>] = &[
    KeywordRule::substrings(&["humanoid", "person", "people"], CharacterType::Humanoid),
    KeywordRule::substrings(&["-like", "animal", "critter"], CharacterType::Creature),
];

/// Optional anatomy named by a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureCue {
    /// Tail chain
    Tail,
    /// Wing pair
    Wings,
    /// Horn pair
    Horns,
    /// Claws
    Claws,
    /// Fangs
    Fangs,
    /// Armor plating
    Armor,
    /// Emissive eyes
    GlowingEyes,
    /// Extra limbs
    ExtraLimbs,
    /// Stands on two legs
    Bipedal,
    /// Not mirrored
    Asymmetric,
}

/// Anatomy vocabulary.
pub static FEATURE_WORDS: &[KeywordRule<FeatureCue>] = &[
    KeywordRule::words(&["tail", "tails", "tailed"], FeatureCue::Tail),
    KeywordRule::words(&["wing", "wings", "winged"], FeatureCue::Wings),
    KeywordRule::words(&["horn", "horns", "horned"], FeatureCue::Horns),
    KeywordRule::words(&["claw", "claws", "clawed", "talons"], FeatureCue::Claws),
    KeywordRule::words(&["fang", "fangs", "tusks", "teeth"], FeatureCue::Fangs),
    KeywordRule::words(&["armor", "armour", "armored", "armoured", "plated"], FeatureCue::Armor),
    KeywordRule::words(
        &["glowing eyes", "glowing eye", "glowing-eyed", "eyes glow", "eyes glowing"],
        FeatureCue::GlowingEyes,
    ),
    KeywordRule::words(
        &["extra limbs", "many legs", "multi-limbed", "six legs", "eight legs", "four arms", "tentacles"],
        FeatureCue::ExtraLimbs,
    ),
    KeywordRule::words(&["bipedal", "biped", "two legs", "upright"], FeatureCue::Bipedal),
    KeywordRule::words(&["asymmetric", "asymmetrical", "lopsided"], FeatureCue::Asymmetric),
];

/// Character motion vocabulary, in preset order.
pub static CHARACTER_ANIMATION_WORDS: &[KeywordRule<AnimationPreset>] = &[
    KeywordRule::words(&["walk", "walking", "walks", "stroll", "strolling", "wander", "wandering"], AnimationPreset::Walk),
    KeywordRule::words(&["run", "running", "runs", "sprint", "sprinting", "dash", "fast"], AnimationPreset::Run),
    KeywordRule::words(&["jump", "jumping", "jumps", "leap", "leaping", "hop", "hopping", "bouncy"], AnimationPreset::Jump),
    KeywordRule::words(&["wave", "waving", "waves", "greeting", "friendly"], AnimationPreset::Wave),
    KeywordRule::words(&["dance", "dancing", "dances", "party"], AnimationPreset::Dance),
    KeywordRule::words(
        &["attack", "attacking", "fight", "fighting", "fierce", "aggressive", "angry", "strike"],
        AnimationPreset::Attack,
    ),
];

/// Surface texture vocabulary, first row wins.
pub static TEXTURE_WORDS: &[KeywordRule<TextureHint>] = &[
    KeywordRule::words(&["furry", "fur", "fluffy", "hairy", "shaggy"], TextureHint::Furry),
    KeywordRule::words(&["scaly", "scales", "scaled", "reptilian"], TextureHint::Scaly),
    KeywordRule::words(&["slimy", "slime", "gooey", "oozing"], TextureHint::Slimy),
    KeywordRule::words(
        &["metallic", "metal", "chrome", "steel", "iron", "robotic", "mechanical"],
        TextureHint::Metallic,
    ),
    KeywordRule::words(&["rocky", "stone", "rock", "granite"], TextureHint::Rocky),
    KeywordRule::words(&["feathered", "feathery", "feathers"], TextureHint::Feathered),
    KeywordRule::words(&["wooden", "wood", "timber"], TextureHint::Wooden),
    KeywordRule::words(&["crystal", "crystalline", "gem", "glass"], TextureHint::Crystal),
    KeywordRule::words(&["smooth", "sleek", "polished"], TextureHint::Smooth),
];

/// Size vocabulary, first row wins.
pub static SCALE_WORDS: &[KeywordRule<f32>] = &[
    KeywordRule::words(&["tiny"], 0.3),
    KeywordRule::words(&["miniature"], 0.4),
    KeywordRule::words(&["small", "little"], 0.6),
    KeywordRule::words(&["large", "big"], 1.5),
    KeywordRule::words(&["huge"], 2.5),
    KeywordRule::words(&["giant", "massive", "enormous"], 3.0),
    KeywordRule::words(&["colossal"], 4.0),
];

/// Words marking the end of a display name.
pub static NAME_STOP_WORDS: &[&str] = &[
    "with", "that", "who", "which", "and", "in", "on", "holding", "wearing", "from", "of", "having",
];

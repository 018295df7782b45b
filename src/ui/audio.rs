use bevy::audio::Volume;
use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MUSIC STATE
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Default)]
pub struct MusicState {
    pub current_track: Option<Entity>,
    pub current_track_id: String,
}

// ═══════════════════════════════════════════════════════════════════════
// PATH MAPPING
// ═══════════════════════════════════════════════════════════════════════

/// Sound effect id to (file, volume).
fn sfx_path(sfx_id: &str) -> Option<(&'static str, f32)> {
    match sfx_id {
        "success" => Some(("audio/success.ogg", 0.3)),
        "water" => Some(("audio/water.ogg", 0.2)),
        "axe" => Some(("audio/axe.ogg", 0.3)),
        "hoe" => Some(("audio/hoe.ogg", 0.2)),
        "plant" => Some(("audio/plant.ogg", 0.2)),
        _ => None,
    }
}

fn music_path(track_id: &str) -> Option<(&'static str, f32)> {
    match track_id {
        "music" => Some(("audio/music.ogg", 0.5)),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// One-shot audio per `PlaySfxEvent`; unknown ids are ignored.
pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
) {
    for event in events.read() {
        if let Some((path, volume)) = sfx_path(&event.sfx_id) {
            commands.spawn((
                AudioPlayer::new(asset_server.load(path)),
                PlaybackSettings::DESPAWN.with_volume(Volume::new(volume)),
            ));
        }
    }
}

/// Replaces the current looping track.
pub fn handle_play_music(
    mut events: EventReader<PlayMusicEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut music_state: ResMut<MusicState>,
) {
    for event in events.read() {
        if music_state.current_track_id == event.track_id && music_state.current_track.is_some() {
            continue;
        }
        if let Some(entity) = music_state.current_track.take() {
            commands.entity(entity).despawn_recursive();
        }

        if let Some((path, volume)) = music_path(&event.track_id) {
            let entity = commands
                .spawn((
                    AudioPlayer::new(asset_server.load(path)),
                    PlaybackSettings::LOOP.with_volume(Volume::new(volume)),
                ))
                .id();
            music_state.current_track = Some(entity);
            music_state.current_track_id = event.track_id.clone();
            info!("[Audio] Playing {}", event.track_id);
        } else {
            music_state.current_track_id.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_cues_have_volumes() {
        assert_eq!(sfx_path("success"), Some(("audio/success.ogg", 0.3)));
        assert_eq!(sfx_path("water").map(|(_, v)| v), Some(0.2));
        assert!(sfx_path("fanfare").is_none());
        assert!(music_path("music").is_some());
    }
}

//! Scripted input replay: drives a camera from a list of input events and
//! records the resulting transforms.

use glam::Vec3;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::context::SoftwareContext;
use crate::core::{FreeCameraDriver, InputEvent, InputState, OrbitGesture, OrbitSettings, Viewport};
use crate::error::Result;
use crate::free_camera::{CameraMode, FreeCamera};
use crate::frustum::FrustumCuller;
use crate::math::AABB;
use crate::orbit::OrbitCamera;
use crate::traits::{CameraController, RenderContext};

fn default_center() -> Vec3 {
    Vec3::new(0.0, 0.0, -5.0)
}

/// Projection an orbit camera configures on the context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectionConfig {
    Perspective {
        fovy: f32,
        z_near: f32,
        z_far: f32,
        #[serde(default = "default_center")]
        center: Vec3,
    },
    Ortho {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CameraConfig {
    Orbit {
        projection: ProjectionConfig,
        #[serde(default)]
        settings: OrbitSettings,
    },
    Free {
        #[serde(default)]
        mode: CameraMode,
        #[serde(default)]
        position: Vec3,
        /// Vertical field of view in degrees for the context's projection
        fovy: f32,
        z_near: f32,
        z_far: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub viewport: Viewport,
    pub camera: CameraConfig,
    #[serde(default)]
    pub events: Vec<InputEvent>,
    /// Boxes to test against the final view frustum
    #[serde(default)]
    pub boxes: Vec<AABB>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Index of the event after which this was taken; `None` for the final state
    pub event: Option<usize>,
    /// Column-major view matrix
    pub view: [[f32; 4]; 4],
    pub eye: Option<Vec3>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub snapshots: Vec<Snapshot>,
    pub projection: [[f32; 4]; 4],
    /// Per-box frustum test result, in script order
    pub visible: Vec<bool>,
}

enum Rig {
    Orbit(OrbitCamera, OrbitGesture),
    Free(FreeCamera, FreeCameraDriver),
}

impl Rig {
    fn camera(&mut self) -> &mut dyn CameraController {
        match self {
            Rig::Orbit(camera, _) => camera,
            Rig::Free(camera, _) => camera,
        }
    }
}

/// Replays `script`. With `every_event`, a snapshot is recorded after each
/// event as well as at the end.
pub fn run(script: &ReplayScript, every_event: bool) -> Result<ReplayReport> {
    script.viewport.validate()?;
    let mut ctx = SoftwareContext::new(script.viewport);
    let win_width = script.viewport.width.round() as u32;
    let win_height = script.viewport.height.round() as u32;

    let mut rig = match &script.camera {
        CameraConfig::Orbit {
            projection,
            settings,
        } => {
            let mut camera = OrbitCamera::new();
            match *projection {
                ProjectionConfig::Perspective {
                    fovy,
                    z_near,
                    z_far,
                    center,
                } => camera.set_perspective(
                    &mut ctx, fovy, z_near, z_far, center, win_width, win_height,
                )?,
                ProjectionConfig::Ortho {
                    left,
                    right,
                    bottom,
                    top,
                    z_near,
                    z_far,
                } => camera.set_ortho(
                    &mut ctx, left, right, bottom, top, z_near, z_far, win_width, win_height,
                )?,
            }
            Rig::Orbit(camera, OrbitGesture::new(*settings))
        }
        CameraConfig::Free {
            mode,
            position,
            fovy,
            z_near,
            z_far,
        } => {
            ctx.set_projection_matrix(crate::math::projection::perspective(
                *fovy,
                script.viewport.aspect(),
                *z_near,
                *z_far,
            ));
            let mut camera = FreeCamera::new(*mode);
            camera.set_position(*position);
            Rig::Free(camera, FreeCameraDriver::default())
        }
    };

    let mut input = InputState::new();
    let mut snapshots = Vec::new();

    for (index, event) in script.events.iter().enumerate() {
        input.apply(event);
        match &mut rig {
            Rig::Orbit(camera, gesture) => gesture.handle(event, camera, &ctx),
            Rig::Free(camera, driver) => {
                if let InputEvent::Tick { dt } = *event {
                    driver.update(camera, &input, dt);
                }
            }
        }
        debug!("replay: event {index} {event:?}");

        if every_event {
            snapshots.push(snapshot(rig.camera(), Some(index)));
        }
    }

    snapshots.push(snapshot(rig.camera(), None));

    ctx.load_identity();
    rig.camera().apply_transform(&mut ctx);

    let mut culler = FrustumCuller::new();
    let visible: Vec<bool> = script.boxes.iter().map(|b| culler.cull(&ctx, b)).collect();

    info!(
        "replayed {} events, {} of {} boxes visible",
        script.events.len(),
        visible.iter().filter(|v| **v).count(),
        visible.len()
    );

    Ok(ReplayReport {
        snapshots,
        projection: ctx.projection_matrix().to_cols_array_2d(),
        visible,
    })
}

fn snapshot(camera: &mut dyn CameraController, event: Option<usize>) -> Snapshot {
    Snapshot {
        event,
        view: camera.view_matrix().to_cols_array_2d(),
        eye: camera.eye_position(),
    }
}

use postwin_bridge::camera::CameraDevice;

#[derive(Debug, Clone, Default)]
pub struct CameraDevicesEntity {
    pub camera_devices: Vec<CameraDevice>,
}

//! Test doubles for the GL device and the window
//!
//! `RecordingDevice` hands out sequential object names and records every
//! call. `ScriptedWindow` replays a list of event batches, one per poll.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::num::NonZeroU32;
use std::rc::Rc;

use crate::events::AppEvent;
use crate::render::opengl::device::{
    BufferHandle, GraphicsDevice, InfoString, ProgramHandle, ShaderHandle, ShaderStage, Topology,
    VertexArrayHandle, VertexAttribute,
};
use crate::render::opengl::RenderResult;
use crate::render::window::WindowBackend;

/// One recorded GL call; object names are plain integers
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    InfoString(InfoString),
    CreateShader(ShaderStage, u32),
    ShaderSource(u32, String),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    CreateBuffer(u32),
    BindArrayBuffer(Option<u32>),
    ArrayBufferData(Vec<u8>),
    DeleteBuffer(u32),
    VertexAttribPointer(VertexAttribute),
    EnableVertexAttribArray(u32),
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear,
    DrawArrays(Topology, i32, i32),
}

type CompileCheck = Box<dyn Fn(ShaderStage, &str) -> Option<String>>;

#[derive(Default)]
struct ShaderState {
    stage: Option<ShaderStage>,
    source: String,
    error: Option<String>,
}

struct DeviceState {
    calls: RefCell<Vec<GlCall>>,
    next_name: Cell<u32>,
    shaders: RefCell<HashMap<u32, ShaderState>>,
    compile_check: Option<CompileCheck>,
    link_failure: Option<String>,
}

/// Device that records calls instead of talking to a driver
///
/// Clones share one call log, so a test can keep a handle while the
/// engine owns another.
#[derive(Clone)]
pub struct RecordingDevice {
    state: Rc<DeviceState>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self {
            state: Rc::new(DeviceState {
                calls: RefCell::new(Vec::new()),
                next_name: Cell::new(1),
                shaders: RefCell::new(HashMap::new()),
                compile_check: None,
                link_failure: None,
            }),
        }
    }

    fn configure(&mut self) -> &mut DeviceState {
        Rc::get_mut(&mut self.state).expect("configure the device before cloning it")
    }

    /// Fail compilation whenever `check` returns a log
    pub fn with_compile_check(mut self, check: impl Fn(ShaderStage, &str) -> Option<String> + 'static) -> Self {
        self.configure().compile_check = Some(Box::new(check));
        self
    }

    /// Fail every link with `log`
    pub fn with_link_failure(mut self, log: &str) -> Self {
        self.configure().link_failure = Some(log.to_string());
        self
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.state.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.state.calls.borrow_mut().clear();
    }

    /// Number of recorded calls matching `predicate`
    pub fn count(&self, predicate: impl Fn(&GlCall) -> bool) -> usize {
        self.state.calls.borrow().iter().filter(|c| predicate(c)).count()
    }

    fn record(&self, call: GlCall) {
        self.state.calls.borrow_mut().push(call);
    }

    fn allocate(&self) -> NonZeroU32 {
        let name = self.state.next_name.get();
        self.state.next_name.set(name + 1);
        NonZeroU32::new(name).expect("names start at 1")
    }
}

impl GraphicsDevice for RecordingDevice {
    fn info_string(&self, which: InfoString) -> String {
        self.record(GlCall::InfoString(which));
        match which {
            InfoString::Vendor => "Test Vendor".to_string(),
            InfoString::Renderer => "Recording Renderer".to_string(),
            InfoString::Version => "3.3.0 Core".to_string(),
        }
    }

    fn create_shader(&self, stage: ShaderStage) -> RenderResult<ShaderHandle> {
        let name = self.allocate();
        self.state.shaders.borrow_mut().insert(
            name.get(),
            ShaderState {
                stage: Some(stage),
                ..ShaderState::default()
            },
        );
        self.record(GlCall::CreateShader(stage, name.get()));
        Ok(ShaderHandle(name))
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        if let Some(state) = self.state.shaders.borrow_mut().get_mut(&shader.0.get()) {
            state.source = source.to_string();
        }
        self.record(GlCall::ShaderSource(shader.0.get(), source.to_string()));
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        if let Some(state) = self.state.shaders.borrow_mut().get_mut(&shader.0.get()) {
            state.error = match (&self.state.compile_check, state.stage) {
                (Some(check), Some(stage)) => check(stage, &state.source),
                _ => None,
            };
        }
        self.record(GlCall::CompileShader(shader.0.get()));
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        self.state.shaders
            .borrow()
            .get(&shader.0.get())
            .is_some_and(|state| state.error.is_none())
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        self.state.shaders
            .borrow()
            .get(&shader.0.get())
            .and_then(|state| state.error.clone())
            .map(|log| format!("{log}\n\0"))
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        self.record(GlCall::DeleteShader(shader.0.get()));
    }

    fn create_program(&self) -> RenderResult<ProgramHandle> {
        let name = self.allocate();
        self.record(GlCall::CreateProgram(name.get()));
        Ok(ProgramHandle(name))
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        self.record(GlCall::AttachShader(program.0.get(), shader.0.get()));
    }

    fn link_program(&self, program: ProgramHandle) {
        self.record(GlCall::LinkProgram(program.0.get()));
    }

    fn program_link_status(&self, _program: ProgramHandle) -> bool {
        self.state.link_failure.is_none()
    }

    fn program_info_log(&self, _program: ProgramHandle) -> String {
        self.state.link_failure.clone().unwrap_or_default()
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        self.record(GlCall::UseProgram(program.map(|p| p.0.get())));
    }

    fn delete_program(&self, program: ProgramHandle) {
        self.record(GlCall::DeleteProgram(program.0.get()));
    }

    fn create_vertex_array(&self) -> RenderResult<VertexArrayHandle> {
        let name = self.allocate();
        self.record(GlCall::CreateVertexArray(name.get()));
        Ok(VertexArrayHandle(name))
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayHandle>) {
        self.record(GlCall::BindVertexArray(vertex_array.map(|v| v.0.get())));
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle) {
        self.record(GlCall::DeleteVertexArray(vertex_array.0.get()));
    }

    fn create_buffer(&self) -> RenderResult<BufferHandle> {
        let name = self.allocate();
        self.record(GlCall::CreateBuffer(name.get()));
        Ok(BufferHandle(name))
    }

    fn bind_array_buffer(&self, buffer: Option<BufferHandle>) {
        self.record(GlCall::BindArrayBuffer(buffer.map(|b| b.0.get())));
    }

    fn array_buffer_data_static(&self, data: &[u8]) {
        self.record(GlCall::ArrayBufferData(data.to_vec()));
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        self.record(GlCall::DeleteBuffer(buffer.0.get()));
    }

    fn vertex_attrib_pointer_f32(&self, attribute: &VertexAttribute) {
        self.record(GlCall::VertexAttribPointer(*attribute));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::EnableVertexAttribArray(index));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport(x, y, width, height));
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        self.record(GlCall::ClearColor(rgba));
    }

    fn clear_color_and_depth(&self) {
        self.record(GlCall::Clear);
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        self.record(GlCall::DrawArrays(topology, first, count));
    }
}

/// Window that replays scripted event batches
pub struct ScriptedWindow {
    size: (u32, u32),
    monitor: Option<(u32, u32)>,
    script: VecDeque<Vec<AppEvent>>,
    should_close: bool,
    pub position: Option<(i32, i32)>,
    pub visible: bool,
    pub swaps: usize,
    pub polls: usize,
}

impl ScriptedWindow {
    /// Hard stop so a broken loop fails the test instead of hanging it
    const MAX_POLLS: usize = 10_000;

    pub fn new(size: (u32, u32)) -> Self {
        Self {
            size,
            monitor: Some((1920, 1080)),
            script: VecDeque::new(),
            should_close: false,
            position: None,
            visible: false,
            swaps: 0,
            polls: 0,
        }
    }

    pub fn without_monitor(mut self) -> Self {
        self.monitor = None;
        self
    }

    /// Queue the events returned by the next poll
    pub fn then(mut self, events: Vec<AppEvent>) -> Self {
        self.script.push_back(events);
        self
    }

    /// Queue `frames` polls that return nothing
    pub fn idle(mut self, frames: usize) -> Self {
        self.script.extend(std::iter::repeat_with(Vec::new).take(frames));
        self
    }
}

impl WindowBackend for ScriptedWindow {
    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.should_close = should_close;
    }

    fn poll_events(&mut self) -> Vec<AppEvent> {
        self.polls += 1;
        assert!(self.polls < Self::MAX_POLLS, "render loop never observed a close request");
        let events = self.script.pop_front().unwrap_or_default();
        // GLFW raises the close flag itself when the close button is hit
        if events.contains(&AppEvent::WindowCloseRequested) {
            self.should_close = true;
        }
        events
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.position = Some((x, y));
    }

    fn primary_monitor_size(&mut self) -> Option<(u32, u32)> {
        self.monitor
    }

    fn show(&mut self) {
        self.visible = true;
    }
}
